pub mod d402_order_analytics;
