//! Diesel table definitions; must match `backend/migrations`.

diesel::table! {
    /// Directory users. Rows with `deleted_at` set are soft-deleted.
    users (id) {
        id -> Int8,
        username -> Text,
        email -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}
