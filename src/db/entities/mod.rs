#[allow(unused_imports)]
pub mod prelude {
    pub use super::todo::Entity as Todo;
}

pub mod todo;
