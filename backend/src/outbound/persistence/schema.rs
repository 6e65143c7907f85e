// Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 150]
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    notes (id) {
        id -> Int8,
        #[max_length = 100]
        title -> Varchar,
        text -> Text,
        #[max_length = 100]
        slug -> Varchar,
        author_id -> Uuid,
    }
}

diesel::table! {
    news (id) {
        id -> Int8,
        #[max_length = 50]
        title -> Varchar,
        text -> Text,
        date -> Date,
    }
}

diesel::table! {
    comments (id) {
        id -> Int8,
        news_id -> Int8,
        author_id -> Uuid,
        text -> Text,
        created -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::joinable!(comments -> news (news_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, notes, news, comments);
