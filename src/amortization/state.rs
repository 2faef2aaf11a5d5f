//! Debt state carried from one simulated year to the next

/// Outstanding debt at a point in time during a simulation
#[derive(Debug, Clone)]
pub struct DebtState {
    /// Years simulated so far (0 before the first year)
    pub year: u32,

    /// Principal outstanding at the start of the next year
    pub remaining_debt: f64,

    /// Interest accumulated over all simulated years
    pub total_interest: f64,
}

/// Amounts for a single simulated year
#[derive(Debug, Clone, Copy)]
pub struct YearStep {
    pub debt_start: f64,
    pub interest: f64,
    pub amortization: f64,
    pub debt_end: f64,
}

impl DebtState {
    /// Initialize state at the start of the loan
    pub fn from_loan_amount(loan_amount: f64) -> Self {
        Self {
            year: 0,
            remaining_debt: loan_amount,
            total_interest: 0.0,
        }
    }

    /// Interest due on the current balance
    pub fn interest_due(&self, rate: f64) -> f64 {
        self.remaining_debt * rate
    }

    /// Apply one year of repayment and return the year's amounts.
    ///
    /// `amortization` is applied as given; callers decide whether to clamp it.
    pub fn advance_year(&mut self, interest: f64, amortization: f64) -> YearStep {
        let debt_start = self.remaining_debt;
        let debt_end = debt_start - amortization;

        self.year += 1;
        self.total_interest += interest;
        self.remaining_debt = debt_end;

        YearStep {
            debt_start,
            interest,
            amortization,
            debt_end,
        }
    }
}
