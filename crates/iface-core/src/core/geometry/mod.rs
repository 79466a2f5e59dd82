pub mod superposition;
