pub mod qr_params;
pub mod validation_policy;
