pub mod gravity_four;
