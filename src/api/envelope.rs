use serde::Deserialize;

use super::error::ApiError;

/// The uniform `{success, message, data}` wrapper every backend endpoint
/// responds with, including failures.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Collapses the wrapper into a `Result`, treating `success: false` as a
    /// backend-reported failure carrying its `message`.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Backend(self.message));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful response carried no data".to_string()))
    }

    /// Like [`Envelope::into_result`] for endpoints whose success carries no
    /// payload (deletes, status updates, order placement).
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Backend(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data_unwraps() {
        let envelope: Envelope<u32> = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Success",
            "data": 7,
        }))
        .unwrap();
        assert_eq!(envelope.into_result().unwrap(), 7);
    }

    #[test]
    fn failure_surfaces_the_backend_message() {
        let envelope: Envelope<u32> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "Cart is empty",
        }))
        .unwrap();
        match envelope.into_result() {
            Err(ApiError::Backend(message)) => assert_eq!(message, "Cart is empty"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn ack_ignores_missing_data() {
        let envelope: Envelope<()> = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Deleted",
        }))
        .unwrap();
        assert!(envelope.into_ack().is_ok());
    }
}
