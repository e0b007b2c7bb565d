#[cfg(test)]
mod test {
    use chrono::{TimeDelta, TimeZone, Utc};

    use crate::config::settings::SettingsConfig;
    use crate::response::TokenResponse;
    use crate::tests::common::*;

    #[test]
    fn expires_in_is_relative_to_construction_time() {
        let issued_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let response = TokenResponse::new_at(
            code_request(),
            params(json!({"access_token": "abc", "expires_in": 3600})),
            issued_at,
        );

        assert_eq!(
            response.access_token_expiration_date(),
            Some(issued_at + TimeDelta::seconds(3600))
        );
        assert!(response.additional_parameter("expires_in").is_none());
    }

    #[test]
    fn expires_in_uses_wall_clock_by_default() {
        let before = Utc::now();
        let response = TokenResponse::new(code_request(), params(json!({"expires_in": 3600})));
        let after = Utc::now();

        let exp = response.access_token_expiration_date().unwrap();
        assert!(exp >= before + TimeDelta::seconds(3600));
        assert!(exp <= after + TimeDelta::seconds(3600));
    }

    #[test]
    fn quoted_and_fractional_expires_in() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let quoted = TokenResponse::new_at(code_request(), params(json!({"expires_in": "120"})), t);
        assert_eq!(quoted.access_token_expiration_date(), Some(t + TimeDelta::seconds(120)));

        let fractional = TokenResponse::new_at(code_request(), params(json!({"expires_in": 0.25})), t);
        assert_eq!(
            fractional.access_token_expiration_date(),
            Some(t + TimeDelta::milliseconds(250))
        );
    }

    #[test]
    fn overflowing_expires_in_is_absent_and_kept() {
        let response = TokenResponse::new(code_request(), params(json!({"expires_in": i64::MAX})));

        assert_eq!(response.access_token_expiration_date(), None);
        assert_eq!(response.additional_parameter("expires_in"), Some(&json!(i64::MAX)));
    }

    #[test]
    fn expiry_checks() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let response = TokenResponse::new_at(code_request(), params(json!({"expires_in": 100})), t);

        assert!(!response.is_access_token_expired_at(t));
        assert!(!response.is_access_token_expired_at(t + TimeDelta::seconds(99)));
        assert!(response.is_access_token_expired_at(t + TimeDelta::seconds(100)));

        assert!(!response.should_refresh_at(t + TimeDelta::seconds(89), 10));
        assert!(response.should_refresh_at(t + TimeDelta::seconds(90), 10));
        assert!(response.should_refresh_at(t, 100));
        assert!(response.should_refresh_at(t, u64::MAX));
    }

    #[test]
    fn unknown_expiration_never_expires() {
        let response = TokenResponse::new(code_request(), params(json!({"access_token": "abc"})));

        assert!(!response.is_access_token_expired_at(Utc::now()));
        assert!(!response.should_refresh_at(Utc::now(), 3600));
        assert!(!response.should_refresh(&SettingsConfig::default()));
    }

    #[test]
    fn should_refresh_uses_configured_margin() {
        let response = TokenResponse::new(code_request(), params(json!({"expires_in": 30})));

        // default margin (60s) is larger than the lifetime
        assert!(response.should_refresh(&SettingsConfig::default()));

        let relaxed = SettingsConfig {
            safety_margin_seconds: Some(5),
            logging: None,
        };
        assert!(!response.should_refresh(&relaxed));
    }
}
