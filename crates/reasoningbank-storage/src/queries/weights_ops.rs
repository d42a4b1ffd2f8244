//! Per-project Beta parameters.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use reasoningbank_core::errors::{RbResult, StorageError};
use reasoningbank_core::signals::{BetaParams, ProjectWeights};

use crate::to_storage_err;

pub fn get_weights(conn: &Connection, project_id: &str) -> RbResult<Option<ProjectWeights>> {
    let row = conn
        .query_row(
            "SELECT explicit_alpha, explicit_beta, usage_alpha, usage_beta,
                    outcome_alpha, outcome_beta, updated_at
             FROM project_weights WHERE project_id = ?1",
            params![project_id],
            |row| {
                Ok((
                    [
                        row.get::<_, f64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, f64>(4)?,
                        row.get::<_, f64>(5)?,
                    ],
                    row.get::<_, String>(6)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((p, updated_at)) = row else {
        return Ok(None);
    };
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| StorageError::CorruptRow {
            table: "project_weights",
            details: format!("updated_at: {e}"),
        })?
        .with_timezone(&Utc);
    Ok(Some(ProjectWeights {
        project_id: project_id.to_string(),
        explicit: BetaParams::new(p[0], p[1]),
        usage: BetaParams::new(p[2], p[3]),
        outcome: BetaParams::new(p[4], p[5]),
        updated_at,
    }))
}

pub fn upsert_weights(conn: &Connection, weights: &ProjectWeights) -> RbResult<()> {
    conn.execute(
        "INSERT INTO project_weights
            (project_id, explicit_alpha, explicit_beta, usage_alpha, usage_beta,
             outcome_alpha, outcome_beta, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(project_id) DO UPDATE SET
            explicit_alpha = excluded.explicit_alpha,
            explicit_beta  = excluded.explicit_beta,
            usage_alpha    = excluded.usage_alpha,
            usage_beta     = excluded.usage_beta,
            outcome_alpha  = excluded.outcome_alpha,
            outcome_beta   = excluded.outcome_beta,
            updated_at     = excluded.updated_at",
        params![
            weights.project_id,
            weights.explicit.alpha,
            weights.explicit.beta,
            weights.usage.alpha,
            weights.usage.beta,
            weights.outcome.alpha,
            weights.outcome.beta,
            weights.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
