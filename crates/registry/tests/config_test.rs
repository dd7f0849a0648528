//! Client configuration tests.

use registry::{ClientConfig, EncryptionConfig, RegistryError, DEFAULT_SERVER};

#[test]
fn test_default_points_at_local_sandbox() {
    let config = ClientConfig::default();
    assert_eq!(config.server, DEFAULT_SERVER);
    assert!(config.username.is_none());
    assert!(config.encryption_data.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_deserializes_with_defaults_and_camel_case_aliases() {
    let config: ClientConfig = serde_json::from_str(
        r#"{
            "username": "ada",
            "password": "secret",
            "programToken": "tok",
            "encryptionData": {
                "clientPrivateKeySetLocation": "/keys/private.json",
                "keySetLocation": "/keys/public.json"
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.server, DEFAULT_SERVER);
    assert_eq!(config.program_token.as_deref(), Some("tok"));
    assert_eq!(
        config.encryption_data,
        Some(EncryptionConfig {
            client_private_key_set_location: "/keys/private.json".into(),
            key_set_location: "/keys/public.json".into(),
        })
    );
}

#[test]
fn test_rejects_empty_server() {
    let config = ClientConfig::default().with_server("  ");
    assert!(matches!(config.validate(), Err(RegistryError::ConfigurationError { .. })));
}

#[test]
fn test_rejects_password_without_username() {
    let config = ClientConfig { password: Some("p".into()), ..ClientConfig::default() };
    assert!(matches!(config.validate(), Err(RegistryError::ConfigurationError { .. })));
}

#[test]
fn test_rejects_blank_encryption_locations() {
    let config = ClientConfig::default().with_encryption(EncryptionConfig {
        client_private_key_set_location: String::new(),
        key_set_location: "/keys/public.json".into(),
    });
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("private key set"));
}

#[test]
fn test_builder_setters() {
    let config = ClientConfig::default()
        .with_credentials("ada", "secret")
        .with_program_token("tok")
        .with_server("https://registry.example.com");

    assert_eq!(config.username.as_deref(), Some("ada"));
    assert_eq!(config.password.as_deref(), Some("secret"));
    assert_eq!(config.server, "https://registry.example.com");
    assert!(config.validate().is_ok());
}
