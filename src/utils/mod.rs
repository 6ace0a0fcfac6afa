pub mod qr_png;
