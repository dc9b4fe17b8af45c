mod health_check;
mod helpers;
mod order;
mod registration;
