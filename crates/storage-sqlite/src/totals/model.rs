use diesel::prelude::*;

use stockroom_core::totals::Total;

use crate::schema::total;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = total)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TotalDB {
    pub name: String,
    pub model: String,
    pub received_count: i32,
    pub hu_yao: i32,
    pub gdl: i32,
    pub na_qing: i32,
}

impl From<TotalDB> for Total {
    fn from(db: TotalDB) -> Self {
        Total {
            name: db.name,
            model: db.model,
            received_count: db.received_count,
            hu_yao: db.hu_yao,
            gdl: db.gdl,
            na_qing: db.na_qing,
        }
    }
}
