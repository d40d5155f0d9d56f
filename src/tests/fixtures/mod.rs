pub mod commands {
    pub mod record_taste_test;
}

pub mod events {
    pub mod taste_test_recorded_v1;
}

pub mod records;
pub mod repositories;
