//! Submission records and the operations that govern their lifecycle.
//!
//! A submission moves `submitted | late -> graded`. All writes funnel through
//! [`Model::upsert`] and [`Model::grade`] so the one-row-per-(assignment, student)
//! invariant and the status derivation stay consistent. The reference instant is
//! always passed in by the caller; nothing here reads the system clock.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::{assignment, user};

/// Status of a submission throughout its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "submission_status_enum"
)]
pub enum SubmissionStatus {
    /// Uploaded at or before the deadline.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Uploaded strictly after the deadline.
    #[sea_orm(string_value = "late")]
    Late,
    /// Marked by a teacher. Terminal: further uploads are rejected.
    #[sea_orm(string_value = "graded")]
    Graded,
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Submitted
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str = match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Late => "late",
            SubmissionStatus::Graded => "graded",
        };
        write!(f, "{}", status_str)
    }
}

/// Failures of the submission lifecycle operations.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Assignment not found")]
    AssignmentNotFound,
    #[error("Submission not found")]
    SubmissionNotFound,
    #[error("Submission has already been graded")]
    AlreadyGraded,
    #[error("Marks must be between 0 and {max}")]
    MarksOutOfRange { max: i64 },
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// A student's uploaded artifact for one assignment, plus its grading state.
///
/// At most one row exists per (assignment, student); re-uploads overwrite the
/// file and timing fields in place via [`Model::upsert`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Primary key of the submission.
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    /// Storage-root-relative reference to the uploaded file.
    pub file_url: String,
    /// Original filename as uploaded by the student.
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    /// Computed once at submission time; never recalculated afterwards.
    pub is_late: bool,
    pub status: SubmissionStatus,
    /// Present only after grading; bounded by the assignment's `max_marks`.
    pub marks: Option<i64>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub graded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::GradedBy",
        to = "super::user::Column::Id"
    )]
    Grader,
}

impl Related<assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A submission joined with the records it references, for display.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub submission: Model,
    pub student: Option<user::Model>,
    pub assignment: Option<assignment::Model>,
    pub grader: Option<user::Model>,
}

impl Model {
    /// Insert or overwrite the caller's submission for `assignment` in a single
    /// atomic statement.
    ///
    /// The unique (assignment_id, student_id) index turns concurrent first
    /// uploads into one insert plus one update; there is no read-then-write
    /// window. The conflict action carries `WHERE status != 'graded'`, so an
    /// upload against a graded submission changes nothing and surfaces as
    /// [`SubmissionError::AlreadyGraded`].
    ///
    /// Lateness is evaluated here, once, against the assignment deadline.
    pub async fn upsert(
        db: &DatabaseConnection,
        assignment: &assignment::Model,
        student_id: i64,
        file_url: &str,
        file_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, SubmissionError> {
        let late = util::deadline::is_late(now, assignment.deadline);
        let status = if late {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        };

        let row = ActiveModel {
            assignment_id: Set(assignment.id),
            student_id: Set(student_id),
            file_url: Set(file_url.to_string()),
            file_name: Set(file_name.to_string()),
            submitted_at: Set(now),
            is_late: Set(late),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let on_conflict = OnConflict::columns([Column::AssignmentId, Column::StudentId])
            .update_columns([
                Column::FileUrl,
                Column::FileName,
                Column::SubmittedAt,
                Column::IsLate,
                Column::Status,
                Column::UpdatedAt,
            ])
            .action_and_where(Expr::col(Column::Status).ne("graded"))
            .to_owned();

        match Entity::insert(row)
            .on_conflict(on_conflict)
            .exec_with_returning(db)
            .await
        {
            Ok(model) => Ok(model),
            // The conflict action was filtered out: the existing row is graded.
            Err(DbErr::RecordNotInserted) => Err(SubmissionError::AlreadyGraded),
            Err(e) => Err(e.into()),
        }
    }

    /// Transition a submission to `graded`, recording marks, feedback, the
    /// grader and the grading instant.
    ///
    /// Marks must satisfy `0 <= marks <= assignment.max_marks`.
    pub async fn grade(
        db: &DatabaseConnection,
        submission_id: i64,
        marks: i64,
        feedback: Option<String>,
        grader_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, SubmissionError> {
        let Some(submission) = Entity::find_by_id(submission_id).one(db).await? else {
            return Err(SubmissionError::SubmissionNotFound);
        };

        let Some(assignment) = submission.find_related(assignment::Entity).one(db).await? else {
            return Err(SubmissionError::AssignmentNotFound);
        };

        if marks < 0 || marks > assignment.max_marks {
            return Err(SubmissionError::MarksOutOfRange {
                max: assignment.max_marks,
            });
        }

        let mut active: ActiveModel = submission.into();
        active.marks = Set(Some(marks));
        active.feedback = Set(feedback);
        active.status = Set(SubmissionStatus::Graded);
        active.graded_at = Set(Some(now));
        active.graded_by = Set(Some(grader_id));
        active.updated_at = Set(now);

        Ok(active.update(db).await?)
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// The caller's submission for an assignment, if any.
    pub async fn find_by_assignment_and_student(
        db: &DatabaseConnection,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    /// All submissions for an assignment, each paired with its submitter and
    /// grader (if graded). Users are fetched in one batched query.
    pub async fn list_for_assignment(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<Vec<(Self, Option<user::Model>, Option<user::Model>)>, DbErr> {
        let submissions = Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .all(db)
            .await?;

        let user_ids: HashSet<i64> = submissions
            .iter()
            .flat_map(|s| [Some(s.student_id), s.graded_by])
            .flatten()
            .collect();

        let users: HashMap<i64, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(submissions
            .into_iter()
            .map(|s| {
                let student = users.get(&s.student_id).cloned();
                let grader = s.graded_by.and_then(|id| users.get(&id).cloned());
                (s, student, grader)
            })
            .collect())
    }

    /// All of a student's submissions across assignments, newest first,
    /// joined with the assignment for title/deadline/max_marks display.
    pub async fn list_for_student(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<(Self, Option<assignment::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .find_also_related(assignment::Entity)
            .all(db)
            .await
    }

    /// A single submission with every cross-entity reference resolved.
    pub async fn get_with_context(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<SubmissionContext>, DbErr> {
        let Some(submission) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let student = user::Entity::find_by_id(submission.student_id).one(db).await?;
        let assignment = assignment::Entity::find_by_id(submission.assignment_id)
            .one(db)
            .await?;
        let grader = match submission.graded_by {
            Some(grader_id) => user::Entity::find_by_id(grader_id).one(db).await?,
            None => None,
        };

        Ok(Some(SubmissionContext {
            submission,
            student,
            assignment,
            grader,
        }))
    }
}
