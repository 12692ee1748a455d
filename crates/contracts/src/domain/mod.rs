pub mod a001_product;
pub mod a002_resource;
pub mod a003_consumable;
pub mod a004_contact;
pub mod a005_account;
pub mod a006_auxiliary;
pub mod a007_support;
pub mod a008_stock_control;
pub mod common;
