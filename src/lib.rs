//! # Gatehouse - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the gatehouse
//! components. Use this crate to get access to all authentication
//! functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Notification`, etc.
//! - **Port traits**: `UserStore`, `CredentialHasher`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ResetPasswordUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `Argon2CredentialHasher`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    DisplayName, DomainError, Email, Notification, NotificationBody, Password, ResetToken, User,
    UserId,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gatehouse_core::{
        CredentialHasher, CredentialHasherError, EmailClient, EmailClientError, UserStore,
        UserStoreError,
    };
}

// Re-export port traits at root level
pub use gatehouse_core::{
    CredentialHasher, CredentialHasherError, EmailClient, EmailClientError, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

// Re-export use cases at root level
pub use gatehouse_application::{
    ChangePasswordUseCase, ForgotPasswordUseCase, LoginUseCase, RegisterUseCase,
    ResetPasswordUseCase, UpdateProfileUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// Session token and auth gate utilities
    pub mod auth {
        pub use gatehouse_adapters::auth::*;
    }

    /// Password hashing
    pub mod security {
        pub use gatehouse_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{
    Argon2CredentialHasher, HashMapUserStore, Mailer, MockEmailClient, PostgresUserStore,
    PostmarkEmailClient, SessionTokenConfig, SessionTokenService, Settings, require_user,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gatehouse_auth_service::{AuthService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
