// Integration tests for facdash
// This file serves as the main entry point for integration tests

mod common;

#[path = "integration/shell_navigation.rs"]
mod shell_navigation;

#[path = "integration/tabs_contract.rs"]
mod tabs_contract;

#[path = "integration/outside_click.rs"]
mod outside_click;

#[path = "integration/render.rs"]
mod render;
