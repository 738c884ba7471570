mod docs;
mod health;
mod utils;
