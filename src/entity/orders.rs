use sea_orm::entity::prelude::*;

/// Line items are a snapshot of the cart at submission, kept as JSON.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub doc_id: Uuid,
    #[sea_orm(unique)]
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub delivery_notes: String,
    pub items: Json,
    pub total: i64,
    pub date: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
