//! Matchers for the composite scalar kinds: quantities, addresses,
//! frequencies and author stamps

use ccda_models::{Address, Author, Frequency, Quantity, SourceLocation};

use crate::compare::{Comparison, Conforms};
use crate::reconcile::Entry;

impl Conforms for Quantity {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.require(
            self.value.as_deref(),
            submitted.value.as_deref(),
            &format!("{element} Value"),
        );
        matched &= cx.require(
            self.units.as_deref(),
            submitted.units.as_deref(),
            &format!("{element} Units"),
        );
        matched
    }
}

impl Conforms for Address {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let fields = [
            ("Use", &self.use_, &submitted.use_),
            ("Street Address Line 1", &self.line1, &submitted.line1),
            ("Street Address Line 2", &self.line2, &submitted.line2),
            ("City", &self.city, &submitted.city),
            ("State", &self.state, &submitted.state),
            ("Postal Code", &self.postal_code, &submitted.postal_code),
            ("Country", &self.country, &submitted.country),
        ];

        let mut matched = true;
        for (name, reference, submitted) in fields {
            matched &= cx.compare(
                reference.as_ref(),
                submitted.as_ref(),
                &format!("{element} {name}"),
            );
        }
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        [&self.line1, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .flatten()
            .map(|e| &e.location)
            .next()
    }
}

impl Entry for Address {}

impl Conforms for Frequency {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.require(
            self.operator.as_deref(),
            submitted.operator.as_deref(),
            &format!("{element} Operator"),
        );
        matched &= cx.require(
            self.institution_specified.as_ref(),
            submitted.institution_specified.as_ref(),
            &format!("{element} Institution Specified"),
        );
        matched &= cx.require(
            self.period_value.as_deref(),
            submitted.period_value.as_deref(),
            &format!("{element} Period Value"),
        );
        matched &= cx.require(
            self.period_unit.as_deref(),
            submitted.period_unit.as_deref(),
            &format!("{element} Period Unit"),
        );
        matched
    }
}

impl Conforms for Author {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.time.as_ref(),
            submitted.time.as_ref(),
            &format!("{element} Time"),
        );
        matched &= cx.compare(
            self.author_id.as_ref(),
            submitted.author_id.as_ref(),
            &format!("{element} Id"),
        );
        matched &= cx.compare_entries(
            self.addresses.as_deref(),
            submitted.addresses.as_deref(),
            &format!("{element} Address"),
        );
        matched &= cx.compare(
            self.organization.as_ref(),
            submitted.organization.as_ref(),
            &format!("{element} Organization Name"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.time
            .as_ref()
            .and_then(|t| t.source())
            .or_else(|| self.organization.as_ref().map(|o| &o.location))
    }
}
