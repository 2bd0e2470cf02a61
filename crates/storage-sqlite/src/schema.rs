//! Diesel table definitions for the inventory schema.
//!
//! Column names on `total` keep their historical casing; Rust-side
//! identifiers are mapped through `sql_name`.

diesel::table! {
    devices (id) {
        id -> Integer,
        owner -> Text,
        date -> Text,
        name -> Text,
        model -> Text,
        count -> Integer,
        project -> Text,
        location -> Text,
    }
}

diesel::table! {
    trash (id) {
        id -> Integer,
        owner -> Text,
        date -> Text,
        name -> Text,
        model -> Text,
        count -> Integer,
        project -> Text,
        location -> Text,
    }
}

diesel::table! {
    total (name, model) {
        name -> Text,
        model -> Text,
        #[sql_name = "receivedcount"]
        received_count -> Integer,
        #[sql_name = "HuYao"]
        hu_yao -> Integer,
        #[sql_name = "GDL"]
        gdl -> Integer,
        #[sql_name = "NaQing"]
        na_qing -> Integer,
    }
}

diesel::allow_tables_to_appear_in_same_query!(devices, trash, total);
