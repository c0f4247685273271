pub mod order_dataset;
