//! `SeaORM` entities for calculations.

pub use calculation::Entity as CalculationEntity;
pub use user::Entity as UserEntity;

/// Owner entity for the `users` table.
///
/// Only the columns the calculations need are mapped: the id is the
/// foreign key target, username and email are unique.
pub mod user {
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub username: String,
        #[sea_orm(unique)]
        pub email: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::calculation::Entity")]
        Calculations,
    }

    impl Related<super::calculation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Calculations.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Calculation entity for the `calculations` table.
pub mod calculation {
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "calculations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        /// Operator name, see `CalculationKind::as_str`.
        #[sea_orm(column_name = "type")]
        pub kind: String,
        pub a: f64,
        pub b: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
