use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub weeks: i32,
    pub tuition: i32,
    pub minimum_skill: String,
    pub scholarship_available: bool,
    pub created_at: DateTime,
    pub bootcamp_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bootcamps::Entity",
        from = "Column::BootcampId",
        to = "super::bootcamps::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Bootcamps,
}

impl Related<super::bootcamps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bootcamps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
