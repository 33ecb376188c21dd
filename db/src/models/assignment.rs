use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Represents an assignment: a task with a deadline and a point value,
/// created by a teacher.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    /// Primary key of the assignment.
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub subject: String,
    /// Due instant. Submissions strictly after this are late.
    pub deadline: DateTime<Utc>,
    /// Maximum achievable marks (positive, defaults to 100).
    pub max_marks: i64,
    pub instructions: Option<String>,
    /// ID of the teacher who owns this assignment.
    pub created_by: i64,
    /// Deactivated assignments are hidden from listings instead of being deleted.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Create a new assignment owned by `created_by`.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        title: &str,
        description: &str,
        subject: &str,
        deadline: DateTime<Utc>,
        max_marks: i64,
        instructions: Option<&str>,
        created_by: i64,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let assignment = ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            subject: Set(subject.to_string()),
            deadline: Set(deadline),
            max_marks: Set(max_marks),
            instructions: Set(instructions.map(|s| s.to_string())),
            created_by: Set(created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        assignment.insert(db).await
    }

    /// Overwrite the editable fields of an existing assignment.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        title: &str,
        description: &str,
        subject: &str,
        deadline: DateTime<Utc>,
        max_marks: i64,
        instructions: Option<&str>,
        is_active: bool,
    ) -> Result<Self, DbErr> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!("assignment {id} not found")));
        };

        let mut active: ActiveModel = existing.into();
        active.title = Set(title.to_string());
        active.description = Set(description.to_string());
        active.subject = Set(subject.to_string());
        active.deadline = Set(deadline);
        active.max_marks = Set(max_marks);
        active.instructions = Set(instructions.map(|s| s.to_string()));
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Soft-delete: flips `is_active` off so submissions stay referable.
    pub async fn deactivate(db: &DatabaseConnection, id: i64) -> Result<Self, DbErr> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!("assignment {id} not found")));
        };

        let mut active: ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All active assignments, with their creators, soonest deadline first.
    pub async fn find_active(
        db: &DatabaseConnection,
    ) -> Result<Vec<(Self, Option<super::user::Model>)>, DbErr> {
        use sea_orm::QueryOrder;

        Entity::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Deadline)
            .find_also_related(super::user::Entity)
            .all(db)
            .await
    }
}
