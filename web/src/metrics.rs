//! Business metrics for the POS backend.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `pos_orders_total{status}` - Orders by outcome (placed, rejected)
//! - `pos_order_revenue_minor_total` - Revenue recorded, minor currency units
//! - `pos_order_lines_total` - Line items sold across all orders
//! - `pos_products_created_total` - Products added to the catalog

use metrics::describe_counter;

/// Initialize and register all business metrics descriptions.
///
/// Call once at application startup, before any metrics are recorded.
pub fn register_business_metrics() {
    describe_counter!(
        "pos_orders_total",
        "Total number of orders by outcome (placed, rejected)"
    );
    describe_counter!(
        "pos_order_revenue_minor_total",
        "Total revenue from recorded orders in minor currency units"
    );
    describe_counter!(
        "pos_order_lines_total",
        "Total number of line items across recorded orders"
    );
    describe_counter!(
        "pos_products_created_total",
        "Total number of products added to the catalog"
    );

    tracing::info!("Business metrics registered");
}

/// Record a successfully placed order.
pub fn record_order_placed(total_minor: i64, lines: usize) {
    metrics::counter!("pos_orders_total", "status" => "placed").increment(1);
    if let Ok(revenue) = u64::try_from(total_minor) {
        metrics::counter!("pos_order_revenue_minor_total").increment(revenue);
    }
    metrics::counter!("pos_order_lines_total").increment(u64::try_from(lines).unwrap_or_default());
    tracing::debug!(total_minor, lines, "Recorded order_placed metric");
}

/// Record a rejected order with the rejection class.
pub fn record_order_rejected(reason: &'static str) {
    metrics::counter!("pos_orders_total", "status" => "rejected", "reason" => reason).increment(1);
    tracing::debug!(reason, "Recorded order_rejected metric");
}

/// Record a product added to the catalog.
pub fn record_product_created() {
    metrics::counter!("pos_products_created_total").increment(1);
}
