mod signup_email;

pub use signup_email::SignupEmail;
