use crate::ApiError;

impl ApiError {
    /// Best single line to show the user, preferring the most specific field.
    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .or(self.title.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_message_then_detail_then_title() {
        let err = ApiError {
            title: Some("Bad Request".into()),
            message: None,
            detail: Some("room taken".into()),
        };
        assert_eq!(err.summary(), Some("room taken"));
        let err = ApiError {
            message: Some("boom".into()),
            ..err
        };
        assert_eq!(err.summary(), Some("boom"));
        assert_eq!(ApiError::default().summary(), None);
    }
}
