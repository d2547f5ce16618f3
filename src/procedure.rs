use std::{fmt, str::FromStr};

/// Remote procedures exposed under [`crate::routes::API_PREFIX`]. The server
/// router and the remote client both derive their paths from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    Healthcheck,
    List,
    Create,
    UpdateText,
    ToggleCompletion,
    Delete,
}

impl Procedure {
    pub const ALL: [Procedure; 6] = [
        Procedure::Healthcheck,
        Procedure::List,
        Procedure::Create,
        Procedure::UpdateText,
        Procedure::ToggleCompletion,
        Procedure::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Procedure::Healthcheck => "healthcheck",
            Procedure::List => "list",
            Procedure::Create => "create",
            Procedure::UpdateText => "updateText",
            Procedure::ToggleCompletion => "toggleCompletion",
            Procedure::Delete => "delete",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Procedure::Healthcheck => "/rpc/healthcheck",
            Procedure::List => "/rpc/list",
            Procedure::Create => "/rpc/create",
            Procedure::UpdateText => "/rpc/updateText",
            Procedure::ToggleCompletion => "/rpc/toggleCompletion",
            Procedure::Delete => "/rpc/delete",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Procedure {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Procedure::ALL
            .into_iter()
            .find(|procedure| procedure.name() == value)
            .ok_or_else(|| format!("unknown procedure: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Procedure;

    #[test]
    fn names_round_trip() {
        for procedure in Procedure::ALL {
            assert_eq!(procedure.name().parse::<Procedure>(), Ok(procedure));
            assert!(procedure.path().ends_with(procedure.name()));
        }
        assert!("createTodo".parse::<Procedure>().is_err());
    }
}
