pub mod health;
pub mod progress;
pub mod settings;

#[cfg(test)]
mod test;
