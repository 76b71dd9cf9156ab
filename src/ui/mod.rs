//! UI module - reusable widgets shared by the app views

pub mod components;
