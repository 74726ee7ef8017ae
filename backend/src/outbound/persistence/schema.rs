//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Reviewer accounts, provisioned out of band.
    users (id) {
        id -> Int4,
        username -> Varchar,
        /// PHC-encoded Argon2id digest.
        password_hash -> Text,
        subject_code -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Website domains imported per subject.
    domains (id) {
        id -> Int4,
        domain -> Text,
        subject_code -> Varchar,
        /// One URL or several separated by commas.
        url -> Text,
    }
}

diesel::table! {
    /// One rating per (domain, user) pair, enforced by a unique constraint.
    ratings (id) {
        id -> Int4,
        domain_id -> Int4,
        user_id -> Int4,
        relevance -> Int2,
        popularity -> Int2,
        professionalism -> Int2,
        remark -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(ratings -> domains (domain_id));
diesel::joinable!(ratings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(domains, ratings, users);
