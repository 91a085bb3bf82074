pub const SCENARIO_COLUMN: &str = "Scenario";
pub const BUSINESS_UNIT_COLUMN: &str = "business_unit";
pub const ACCOUNT_COLUMN: &str = "Account";
pub const YEAR_COLUMN: &str = "Year";

pub const ACTUALS_SCENARIO: &str = "Actuals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_label(label: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|month| month.label() == label)
    }
}
