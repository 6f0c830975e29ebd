pub mod channel;
pub mod status;
pub mod widget;
