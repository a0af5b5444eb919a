pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginOutcome, LoginUseCase},
    register::{RegisterError, RegisterOutcome, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordOutcome, ResetPasswordUseCase},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
};
