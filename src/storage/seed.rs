//! Sample dataset used for development and tests

use crate::core::error::ApiResult;
use crate::core::store::Store;
use crate::entities::company::Company;
use crate::entities::industry::{CompanyIndustry, Industry};
use crate::entities::invoice::NewInvoice;
use chrono::{TimeZone, Utc};

/// Populate an empty store with two companies, four invoices and two industries
///
/// | company | invoices (amt, paid)              | industries     |
/// |---------|-----------------------------------|----------------|
/// | apple   | 100 no, 200 no, 300 yes           | comp, sftwr    |
/// | ibm     | 400 no                            | comp           |
///
/// Invoice ids are 1 to 4 on a fresh store.
pub async fn seed_sample_data(store: &dyn Store) -> ApiResult<()> {
    for (code, name, description) in [
        ("apple", "Apple Computer", "Maker of OSX."),
        ("ibm", "IBM", "Big blue."),
    ] {
        store
            .insert_company(Company {
                code: code.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?;
    }

    let mut ids = Vec::new();
    for (comp_code, amt) in [("apple", 100.0), ("apple", 200.0), ("apple", 300.0), ("ibm", 400.0)] {
        let invoice = store
            .insert_invoice(&NewInvoice {
                comp_code: comp_code.to_string(),
                amt,
            })
            .await?;
        ids.push(invoice.id);
    }

    let paid_at = Utc
        .with_ymd_and_hms(2018, 1, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    store.update_invoice(ids[2], 300.0, true, paid_at).await?;

    for (code, industry) in [("comp", "Computers"), ("sftwr", "Software")] {
        store
            .insert_industry(Industry {
                code: code.to_string(),
                industry: industry.to_string(),
            })
            .await?;
    }

    for (company_code, industry_code) in [("apple", "comp"), ("ibm", "comp"), ("apple", "sftwr")] {
        store
            .insert_assignment(CompanyIndustry {
                company_code: company_code.to_string(),
                industry_code: industry_code.to_string(),
            })
            .await?;
    }

    tracing::info!("Seeded sample data");
    Ok(())
}
