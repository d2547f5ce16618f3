use sea_orm::entity::prelude::DateTimeWithTimeZone;

pub trait HasTimestampColumns: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
}

pub trait TimestampedModel {
    fn updated_at(&self) -> DateTimeWithTimeZone;
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);
}
