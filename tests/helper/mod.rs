pub mod pagure;
