use crate::modules::taste_tests::core::events::TasteTestEvent;
use crate::modules::taste_tests::core::state::TasteTestState;

pub fn evolve(state: TasteTestState, event: TasteTestEvent) -> TasteTestState {
    match (state, event) {
        (TasteTestState::None, TasteTestEvent::TasteTestRecordedV1(e)) => {
            TasteTestState::Recorded {
                test_id: e.test_id,
                user_id: e.user_id,
                product_id: e.product_id,
                created_at: e.created_at,
            }
        }
        (state, _) => state,
    }
}
