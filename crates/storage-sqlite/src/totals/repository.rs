use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;

use stockroom_core::totals::{
    LedgerSums, Total, TotalRepositoryTrait, LOCATION_GDL, LOCATION_HU_YAO,
};
use stockroom_core::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{devices, total};

use super::model::TotalDB;

pub struct TotalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TotalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TotalRepository { pool, writer }
    }

    pub fn load_totals_impl(&self) -> Result<Vec<Total>> {
        let mut conn = get_connection(&self.pool)?;
        load_totals_stmt(&mut conn)
    }
}

fn load_totals_stmt(conn: &mut SqliteConnection) -> Result<Vec<Total>> {
    let rows = total::table
        .load::<TotalDB>(conn)
        .map_err(StorageError::from)?;
    Ok(rows.into_iter().map(Total::from).collect())
}

/// Sums the ledger for one totals row. `received_count` is scoped by name
/// and model; the location sums ignore the model.
fn ledger_sums(
    conn: &mut SqliteConnection,
    device_name: &str,
    device_model: &str,
) -> Result<LedgerSums> {
    let received_count: Option<i64> = devices::table
        .filter(devices::name.eq(device_name))
        .filter(devices::model.eq(device_model))
        .select(sum(devices::count))
        .first(conn)
        .map_err(StorageError::from)?;
    let hu_yao: Option<i64> = devices::table
        .filter(devices::name.eq(device_name))
        .filter(devices::location.eq(LOCATION_HU_YAO))
        .select(sum(devices::count))
        .first(conn)
        .map_err(StorageError::from)?;
    let gdl: Option<i64> = devices::table
        .filter(devices::name.eq(device_name))
        .filter(devices::location.eq(LOCATION_GDL))
        .select(sum(devices::count))
        .first(conn)
        .map_err(StorageError::from)?;
    Ok(LedgerSums {
        received_count: received_count.unwrap_or(0),
        hu_yao: hu_yao.unwrap_or(0),
        gdl: gdl.unwrap_or(0),
    })
}

fn recalculate_pair_stmt(
    conn: &mut SqliteConnection,
    device_name: &str,
    device_model: &str,
) -> Result<()> {
    let sums = ledger_sums(conn, device_name, device_model)?;
    // Zero rows updated means the pair has no provisioned totals row; that
    // is still success.
    diesel::update(
        total::table
            .filter(total::name.eq(device_name))
            .filter(total::model.eq(device_model)),
    )
    .set((
        total::received_count.eq(sums.received_count as i32),
        total::hu_yao.eq(sums.hu_yao as i32),
        total::gdl.eq(sums.gdl as i32),
        total::na_qing.eq(sums.na_qing() as i32),
    ))
    .execute(conn)
    .map_err(StorageError::from)?;
    Ok(())
}

fn recalculate_all_stmt(conn: &mut SqliteConnection) -> Result<()> {
    let keys: Vec<(String, String)> = total::table
        .select((total::name, total::model))
        .load(conn)
        .map_err(StorageError::from)?;
    for (device_name, device_model) in keys {
        recalculate_pair_stmt(conn, &device_name, &device_model)?;
    }
    Ok(())
}

#[async_trait]
impl TotalRepositoryTrait for TotalRepository {
    fn load_totals(&self) -> Result<Vec<Total>> {
        self.load_totals_impl()
    }

    async fn recalculate_pair(&self, name: &str, model: &str) -> Result<()> {
        let device_name = name.to_string();
        let device_model = model.to_string();
        self.writer
            .exec(move |conn| recalculate_pair_stmt(conn, &device_name, &device_model))
            .await
    }

    async fn recalculate_all(&self) -> Result<()> {
        self.writer.exec(recalculate_all_stmt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn test_conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    fn seed_total(conn: &mut SqliteConnection, device_name: &str, device_model: &str) {
        diesel::insert_into(total::table)
            .values((
                total::name.eq(device_name),
                total::model.eq(device_model),
            ))
            .execute(conn)
            .unwrap();
    }

    fn seed_device(
        conn: &mut SqliteConnection,
        device_name: &str,
        device_model: &str,
        device_count: i32,
        device_location: &str,
    ) {
        diesel::insert_into(devices::table)
            .values((
                devices::owner.eq("alice"),
                devices::date.eq("2024-05-01"),
                devices::name.eq(device_name),
                devices::model.eq(device_model),
                devices::count.eq(device_count),
                devices::project.eq("rollout"),
                devices::location.eq(device_location),
            ))
            .execute(conn)
            .unwrap();
    }

    fn total_for(conn: &mut SqliteConnection, device_name: &str, device_model: &str) -> Total {
        load_totals_stmt(conn)
            .unwrap()
            .into_iter()
            .find(|t| t.name == device_name && t.model == device_model)
            .unwrap()
    }

    #[test]
    fn recalculation_applies_asymmetric_location_sums() {
        let mut conn = test_conn();
        seed_total(&mut conn, "Router", "X1");
        seed_total(&mut conn, "Router", "X2");
        seed_device(&mut conn, "Router", "X1", 5, "HuYao");
        seed_device(&mut conn, "Router", "X1", 3, "GDL");
        seed_device(&mut conn, "Router", "X2", 2, "HuYao");

        recalculate_all_stmt(&mut conn).unwrap();

        // The location sums count every Router row regardless of model, so
        // the X1 residual goes negative.
        let x1 = total_for(&mut conn, "Router", "X1");
        assert_eq!(x1.received_count, 8);
        assert_eq!(x1.hu_yao, 7);
        assert_eq!(x1.gdl, 3);
        assert_eq!(x1.na_qing, -2);

        let x2 = total_for(&mut conn, "Router", "X2");
        assert_eq!(x2.received_count, 2);
        assert_eq!(x2.hu_yao, 7);
        assert_eq!(x2.gdl, 3);
        assert_eq!(x2.na_qing, -8);
    }

    #[test]
    fn recalculation_for_unprovisioned_pair_is_a_noop() {
        let mut conn = test_conn();
        seed_device(&mut conn, "Router", "X1", 5, "HuYao");

        recalculate_pair_stmt(&mut conn, "Router", "X1").unwrap();

        assert!(load_totals_stmt(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn recalculation_zeroes_stale_values_when_ledger_is_empty() {
        let mut conn = test_conn();
        seed_total(&mut conn, "Router", "X1");
        diesel::update(total::table)
            .set((
                total::received_count.eq(9),
                total::hu_yao.eq(4),
                total::gdl.eq(2),
                total::na_qing.eq(3),
            ))
            .execute(&mut conn)
            .unwrap();

        recalculate_pair_stmt(&mut conn, "Router", "X1").unwrap();

        let row = total_for(&mut conn, "Router", "X1");
        assert_eq!(row.received_count, 0);
        assert_eq!(row.hu_yao, 0);
        assert_eq!(row.gdl, 0);
        assert_eq!(row.na_qing, 0);
    }

    #[test]
    fn repeated_recalculation_is_idempotent() {
        let mut conn = test_conn();
        seed_total(&mut conn, "Router", "X1");
        seed_device(&mut conn, "Router", "X1", 5, "HuYao");
        seed_device(&mut conn, "Router", "X1", 3, "NaQing");

        recalculate_all_stmt(&mut conn).unwrap();
        let first = load_totals_stmt(&mut conn).unwrap();
        recalculate_all_stmt(&mut conn).unwrap();
        let second = load_totals_stmt(&mut conn).unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].received_count, 8);
        assert_eq!(first[0].na_qing, 3);
    }

    #[test]
    fn recalculation_excludes_deleted_rows() {
        let mut conn = test_conn();
        seed_total(&mut conn, "Router", "X1");
        seed_device(&mut conn, "Router", "X1", 5, "HuYao");
        seed_device(&mut conn, "Router", "X1", 3, "GDL");
        recalculate_pair_stmt(&mut conn, "Router", "X1").unwrap();
        assert_eq!(total_for(&mut conn, "Router", "X1").received_count, 8);

        diesel::delete(devices::table.filter(devices::location.eq("GDL")))
            .execute(&mut conn)
            .unwrap();
        recalculate_pair_stmt(&mut conn, "Router", "X1").unwrap();

        let row = total_for(&mut conn, "Router", "X1");
        assert_eq!(row.received_count, 5);
        assert_eq!(row.hu_yao, 5);
        assert_eq!(row.gdl, 0);
        assert_eq!(row.na_qing, 0);
    }
}
