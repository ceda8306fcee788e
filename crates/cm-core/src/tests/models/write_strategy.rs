use crate::WriteStrategy;

#[test]
fn test_write_strategy_order() {
    assert_eq!(
        WriteStrategy::ORDERED,
        [
            WriteStrategy::DirectUpdate,
            WriteStrategy::Upsert,
            WriteStrategy::ElevatedAssign,
        ]
    );
}

#[test]
fn test_write_strategy_as_str() {
    assert_eq!(WriteStrategy::DirectUpdate.as_str(), "direct_update");
    assert_eq!(WriteStrategy::Upsert.as_str(), "upsert");
    assert_eq!(WriteStrategy::ElevatedAssign.as_str(), "elevated_assign");
}

#[test]
fn test_write_strategy_display() {
    assert_eq!(WriteStrategy::Upsert.to_string(), "upsert");
}
