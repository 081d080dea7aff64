// Per-view reporting knobs.
//
// The deck template has fixed slots sized for specific row counts, so the
// defaults here are the numbers the template was built around. Lifting them
// into one structure keeps the view functions free of magic constants.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
}

/// Top-N truncation for ranked tables.
#[derive(Debug, Clone, Copy)]
pub struct RankConfig {
    pub top_n: usize,
}

/// Window length and unit for gap-filled time series.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    pub periods: usize,
    pub granularity: Granularity,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub destinations: RankConfig,
    pub hs_exports: RankConfig,
    pub hs_imports: RankConfig,
    pub consignees: RankConfig,
    pub yearly_exports: WindowConfig,
    pub yearly_imports: WindowConfig,
    pub monthly_imports: WindowConfig,
    pub recent_shipments: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            destinations: RankConfig { top_n: 10 },
            hs_exports: RankConfig { top_n: 5 },
            hs_imports: RankConfig { top_n: 5 },
            consignees: RankConfig { top_n: 10 },
            yearly_exports: WindowConfig {
                periods: 5,
                granularity: Granularity::Year,
            },
            yearly_imports: WindowConfig {
                periods: 6,
                granularity: Granularity::Year,
            },
            monthly_imports: WindowConfig {
                periods: 13,
                granularity: Granularity::Month,
            },
            recent_shipments: 10,
        }
    }
}
