pub mod alert_stack;
pub mod map_panel;
pub mod receipt_form;
