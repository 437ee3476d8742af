pub mod ruby;
