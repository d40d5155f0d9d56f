#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TasteTestState {
    None,
    Recorded {
        test_id: String,
        user_id: String,
        product_id: String,
        created_at: i64,
    },
}
