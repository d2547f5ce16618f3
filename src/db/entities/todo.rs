use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    pub text: String,
    #[sea_orm(default_value = false)]
    pub completed: bool,
}

impl ActiveModelBehavior for ActiveModel {}
