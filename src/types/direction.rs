use serde::{Deserialize, Serialize};

/// Direction of a message relative to the ingestion service.
///
/// Everything this client submits is inbound; `Out` exists because the
/// upstream schema records both directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A message received by the service.
    In,

    /// A message sent by the service.
    Out,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn direction_serialization() {
        assert_eq!(to_value(Direction::In).unwrap(), json!("In"));
        assert_eq!(to_value(Direction::Out).unwrap(), json!("Out"));
    }

    #[test]
    fn direction_deserialization() {
        let direction: Direction = serde_json::from_value(json!("In")).unwrap();
        assert_eq!(direction, Direction::In);
    }
}
