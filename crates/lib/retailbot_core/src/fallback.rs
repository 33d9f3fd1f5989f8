//! Deterministic fallback responder.
//!
//! Used whenever the completion API is unconfigured or fails: the message is
//! lower-cased and scanned against a fixed ordered keyword table; the first
//! matching entry wins. No side effects, no failure modes.

/// Ordered (keyword, advisory paragraph) table. Order matters: the first
/// keyword contained in the message selects the response.
const ADVISORIES: &[(&str, &str)] = &[
    (
        "customer",
        "Customer experience optimization requires tracking NPS scores (target >50), \
         implementing personalization using purchase history, and ensuring omnichannel \
         consistency. Focus on reducing customer effort scores and real-time feedback loops. \
         Omnichannel customers typically spend 15-35% more than single-channel customers.",
    ),
    (
        "inventory",
        "For FMCG inventory management: Use ABC analysis (A-items need daily monitoring), \
         maintain 15-20% safety stock, target 8-12x annual turnover for most categories. \
         Implement demand forecasting with seasonality and keep stock-out rates below 2%. \
         Monitor inventory-to-sales ratios monthly.",
    ),
    (
        "sales",
        "Sales optimization: Implement dynamic pricing (2-5% revenue boost), use \
         cross-selling at checkout, optimize placement with heat mapping. Track conversion \
         rates, basket size, customer lifetime value. A/B test promotions and use \
         personalized recommendations.",
    ),
    (
        "supply",
        "Supply chain resilience: Diversify suppliers, use scorecards for performance \
         tracking, maintain strategic safety stock. Target >98% fill rates and >95% perfect \
         order rates. Implement supply chain mapping to identify bottlenecks.",
    ),
    (
        "analytics",
        "Key retail KPIs: inventory turnover by category, gross margins, customer \
         acquisition cost, conversion rates by channel, stock-out frequencies. Use automated \
         alerts and cohort analysis for retention insights.",
    ),
    (
        "optimize",
        "For retail optimization, focus on: 1) Customer journey mapping, 2) Data-driven \
         pricing strategies, 3) Supply chain efficiency, and 4) Omnichannel integration.",
    ),
    (
        "hello",
        "Hello! I'm RetailBot, your AI assistant for FMCG and retail optimization. I can \
         help with inventory management, sales strategies, customer experience, and supply \
         chain optimization.",
    ),
];

/// Returned when no keyword matches.
const GENERIC_ADVISORY: &str =
    "I specialize in retail and FMCG optimization. I can help with inventory management, \
     customer experience, sales strategies, supply chain, and analytics. What would you \
     like to explore?";

/// Pick the advisory paragraph for a message, or the generic capability
/// description when nothing matches.
pub fn fallback_response(message: &str) -> &'static str {
    let message = message.to_lowercase();
    ADVISORIES
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, advisory)| *advisory)
        .unwrap_or(GENERIC_ADVISORY)
}
