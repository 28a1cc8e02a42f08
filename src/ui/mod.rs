pub mod send_ui;
