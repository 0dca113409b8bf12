//! Diesel schema definitions for the Harbormaster server.

diesel::table! {
    ships (id) {
        id -> Int4,
        name -> Text,
        displacement -> Float8,
        port -> Text,
        captain -> Text,
        berth_num -> Int4,
        target -> Text,
    }
}
