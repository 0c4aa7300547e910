pub mod furnace;
