//! Macro-generated test suite for `Store` contract validation.
//!
//! The `store_contract_tests!` macro generates a test module that validates
//! any `Store` implementation against the full contract: CRUD on the three
//! tables, orderings, referential rules and the invoice payment transitions.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use biztime::storage::InMemoryStore;
//!
//! store_contract_tests!(InMemoryStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Companies
//! - `test_company_insert_get_list`: rows come back ordered by code
//! - `test_company_duplicate_code`: unique violation
//! - `test_company_update`: name/description change, code does not
//! - `test_company_update_missing`: `None`
//! - `test_company_delete`: `true`, then `false`
//! - `test_company_delete_with_invoices`: foreign key violation, row kept
//! - `test_company_industry_names`: ordered by industry code
//!
//! ## Invoices
//! - `test_invoice_insert_defaults`: unpaid, no paid date
//! - `test_invoice_unknown_company`: foreign key violation
//! - `test_invoice_list_and_for_company`: ordered by id
//! - `test_invoice_mark_paid_then_unpaid`: paid date follows `paid`
//! - `test_invoice_unchanged_paid_keeps_date`: only amount changes
//! - `test_invoice_update_missing`: `None`
//! - `test_invoice_delete`: `true`, then `false`
//!
//! ## Industries
//! - `test_industry_insert_get_list`: ordered by code
//! - `test_industry_duplicate_code`: unique violation
//! - `test_assignment_rules`: duplicates and dangling sides are rejected
//! - `test_assignments_ordering`: ordered by (industry, company)
//! - `test_industry_company_codes`: one industry's companies, ordered by code
//! - `test_industry_delete_cascades`: assignments go with the industry
//! - `test_company_delete_cascades`: assignments go with the company
//!
//! ## Concurrency
//! - `test_concurrent_invoice_inserts`: ids are unique
//! - `test_concurrent_mark_paid`: exactly one update stamps the paid date
//! - `test_concurrent_company_delete_and_update`: one delete wins, no errors

/// Generate a full `Store` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store. It is
/// re-evaluated for each test to ensure isolation. For the concurrency test,
/// the returned store must also implement `Clone + 'static`.
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract {
            use super::*;
            use biztime::core::error::Constraint;
            use biztime::core::store::{CompanyStore, IndustryStore, InvoiceStore};
            use chrono::{TimeZone, Utc};

            // ==================================================================
            // Companies
            // ==================================================================

            #[tokio::test]
            async fn test_company_insert_get_list() {
                let store = $factory;
                store.insert_company(company("ibm", "IBM")).await.unwrap();
                let created = store
                    .insert_company(company("apple", "Apple Computer"))
                    .await
                    .unwrap();
                assert_eq!(created.code, "apple");

                let fetched = store.get_company("apple").await.unwrap().unwrap();
                assert_eq!(fetched, company("apple", "Apple Computer"));
                assert!(store.get_company("nope").await.unwrap().is_none());

                let codes: Vec<String> = store
                    .list_companies()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|c| c.code)
                    .collect();
                assert_eq!(codes, vec!["apple", "ibm"]);
            }

            #[tokio::test]
            async fn test_company_duplicate_code() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                let err = store
                    .insert_company(company("apple", "Other Apple"))
                    .await
                    .unwrap_err();
                assert_constraint(err, Constraint::Unique);

                let fetched = store.get_company("apple").await.unwrap().unwrap();
                assert_eq!(fetched.name, "Apple");
            }

            #[tokio::test]
            async fn test_company_update() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();

                let updated = store
                    .update_company("apple", &company_changes("Apple Inc.", "Phones"))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(updated.code, "apple");
                assert_eq!(updated.name, "Apple Inc.");
                assert_eq!(updated.description, "Phones");

                let fetched = store.get_company("apple").await.unwrap().unwrap();
                assert_eq!(fetched, updated);
            }

            #[tokio::test]
            async fn test_company_update_missing() {
                let store = $factory;
                let result = store
                    .update_company("nope", &company_changes("Nope", ""))
                    .await
                    .unwrap();
                assert!(result.is_none());
                assert!(store.list_companies().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_company_delete() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();

                assert!(store.delete_company("apple").await.unwrap());
                assert!(store.get_company("apple").await.unwrap().is_none());
                assert!(!store.delete_company("apple").await.unwrap());
            }

            #[tokio::test]
            async fn test_company_delete_with_invoices() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_invoice(&new_invoice("apple", 100.0)).await.unwrap();

                let err = store.delete_company("apple").await.unwrap_err();
                assert_constraint(err, Constraint::ForeignKey);
                assert!(store.get_company("apple").await.unwrap().is_some());
                assert_eq!(store.list_invoices().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_company_industry_names() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_industry(industry("sftwr", "Software")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                store.insert_assignment(assignment("apple", "sftwr")).await.unwrap();
                store.insert_assignment(assignment("apple", "comp")).await.unwrap();

                let names = store.company_industry_names("apple").await.unwrap();
                assert_eq!(names, vec!["Computers", "Software"]);
                assert!(store.company_industry_names("ibm").await.unwrap().is_empty());
            }

            // ==================================================================
            // Invoices
            // ==================================================================

            #[tokio::test]
            async fn test_invoice_insert_defaults() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();

                let before = Utc::now() - chrono::Duration::seconds(5);
                let invoice = store.insert_invoice(&new_invoice("apple", 150.5)).await.unwrap();

                assert_eq!(invoice.comp_code, "apple");
                assert_amount(invoice.amt, 150.5);
                assert!(!invoice.paid);
                assert!(invoice.paid_date.is_none());
                assert!(invoice.add_date >= before);

                let fetched = store.get_invoice(invoice.id).await.unwrap().unwrap();
                assert_eq!(fetched, invoice);
            }

            #[tokio::test]
            async fn test_invoice_unknown_company() {
                let store = $factory;
                let err = store
                    .insert_invoice(&new_invoice("ghost", 10.0))
                    .await
                    .unwrap_err();
                assert_constraint(err, Constraint::ForeignKey);
                assert!(store.list_invoices().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_invoice_list_and_for_company() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_company(company("ibm", "IBM")).await.unwrap();

                let a1 = store.insert_invoice(&new_invoice("apple", 1.0)).await.unwrap();
                let i1 = store.insert_invoice(&new_invoice("ibm", 2.0)).await.unwrap();
                let a2 = store.insert_invoice(&new_invoice("apple", 3.0)).await.unwrap();

                let all: Vec<i32> = store
                    .list_invoices()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|i| i.id)
                    .collect();
                assert_eq!(all, vec![a1.id, i1.id, a2.id]);
                assert!(a1.id < i1.id && i1.id < a2.id);

                let apple: Vec<i32> = store
                    .invoices_for_company("apple")
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|i| i.id)
                    .collect();
                assert_eq!(apple, vec![a1.id, a2.id]);
                assert!(store.invoices_for_company("nope").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_invoice_mark_paid_then_unpaid() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                let invoice = store.insert_invoice(&new_invoice("apple", 100.0)).await.unwrap();

                let paid_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
                let paid = store
                    .update_invoice(invoice.id, 2000.0, true, paid_at)
                    .await
                    .unwrap()
                    .unwrap();
                assert!(paid.paid);
                assert_amount(paid.amt, 2000.0);
                assert_eq!(paid.paid_date, Some(paid_at));
                assert_eq!(paid.add_date, invoice.add_date);

                let unpaid = store
                    .update_invoice(invoice.id, 2000.0, false, Utc::now())
                    .await
                    .unwrap()
                    .unwrap();
                assert!(!unpaid.paid);
                assert!(unpaid.paid_date.is_none());

                let fetched = store.get_invoice(invoice.id).await.unwrap().unwrap();
                assert_eq!(fetched, unpaid);
            }

            #[tokio::test]
            async fn test_invoice_unchanged_paid_keeps_date() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                let invoice = store.insert_invoice(&new_invoice("apple", 100.0)).await.unwrap();

                for amt in [110.0, 120.0] {
                    let updated = store
                        .update_invoice(invoice.id, amt, false, Utc::now())
                        .await
                        .unwrap()
                        .unwrap();
                    assert!(!updated.paid);
                    assert!(updated.paid_date.is_none());
                    assert_amount(updated.amt, amt);
                }

                let paid_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
                store
                    .update_invoice(invoice.id, 130.0, true, paid_at)
                    .await
                    .unwrap();
                let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
                let still_paid = store
                    .update_invoice(invoice.id, 140.0, true, later)
                    .await
                    .unwrap()
                    .unwrap();
                assert!(still_paid.paid);
                assert_amount(still_paid.amt, 140.0);
                assert_eq!(still_paid.paid_date, Some(paid_at));
            }

            #[tokio::test]
            async fn test_invoice_update_missing() {
                let store = $factory;
                let result = store.update_invoice(999, 1.0, true, Utc::now()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_invoice_delete() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                let invoice = store.insert_invoice(&new_invoice("apple", 100.0)).await.unwrap();

                assert!(store.delete_invoice(invoice.id).await.unwrap());
                assert!(store.get_invoice(invoice.id).await.unwrap().is_none());
                assert!(!store.delete_invoice(invoice.id).await.unwrap());

                // With its last invoice gone the company can be deleted
                assert!(store.delete_company("apple").await.unwrap());
            }

            // ==================================================================
            // Industries
            // ==================================================================

            #[tokio::test]
            async fn test_industry_insert_get_list() {
                let store = $factory;
                store.insert_industry(industry("sftwr", "Software")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();

                let fetched = store.get_industry("comp").await.unwrap().unwrap();
                assert_eq!(fetched, industry("comp", "Computers"));
                assert!(store.get_industry("acct").await.unwrap().is_none());

                let codes: Vec<String> = store
                    .list_industries()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|i| i.code)
                    .collect();
                assert_eq!(codes, vec!["comp", "sftwr"]);
            }

            #[tokio::test]
            async fn test_industry_duplicate_code() {
                let store = $factory;
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                let err = store
                    .insert_industry(industry("comp", "Compute"))
                    .await
                    .unwrap_err();
                assert_constraint(err, Constraint::Unique);
            }

            #[tokio::test]
            async fn test_assignment_rules() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();

                let created = store.insert_assignment(assignment("apple", "comp")).await.unwrap();
                assert_eq!(created, assignment("apple", "comp"));

                let duplicate = store
                    .insert_assignment(assignment("apple", "comp"))
                    .await
                    .unwrap_err();
                assert_constraint(duplicate, Constraint::Unique);

                let no_company = store
                    .insert_assignment(assignment("ghost", "comp"))
                    .await
                    .unwrap_err();
                assert_constraint(no_company, Constraint::ForeignKey);

                let no_industry = store
                    .insert_assignment(assignment("apple", "ghost"))
                    .await
                    .unwrap_err();
                assert_constraint(no_industry, Constraint::ForeignKey);

                assert_eq!(store.list_assignments().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_assignments_ordering() {
                let store = $factory;
                store.insert_company(company("ibm", "IBM")).await.unwrap();
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_industry(industry("sftwr", "Software")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                store.insert_assignment(assignment("apple", "sftwr")).await.unwrap();
                store.insert_assignment(assignment("ibm", "comp")).await.unwrap();
                store.insert_assignment(assignment("apple", "comp")).await.unwrap();

                let assignments = store.list_assignments().await.unwrap();
                assert_eq!(
                    assignments,
                    vec![
                        assignment("apple", "comp"),
                        assignment("ibm", "comp"),
                        assignment("apple", "sftwr"),
                    ]
                );
            }

            #[tokio::test]
            async fn test_industry_company_codes() {
                let store = $factory;
                store.insert_company(company("ibm", "IBM")).await.unwrap();
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                store.insert_industry(industry("sftwr", "Software")).await.unwrap();
                store.insert_assignment(assignment("ibm", "comp")).await.unwrap();
                store.insert_assignment(assignment("apple", "comp")).await.unwrap();
                store.insert_assignment(assignment("apple", "sftwr")).await.unwrap();

                assert_eq!(
                    store.industry_company_codes("comp").await.unwrap(),
                    vec!["apple", "ibm"]
                );
                assert_eq!(
                    store.industry_company_codes("sftwr").await.unwrap(),
                    vec!["apple"]
                );
                assert!(store.industry_company_codes("acct").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_industry_delete_cascades() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                store.insert_assignment(assignment("apple", "comp")).await.unwrap();

                assert!(store.delete_industry("comp").await.unwrap());
                assert!(store.get_industry("comp").await.unwrap().is_none());
                assert!(store.list_assignments().await.unwrap().is_empty());
                assert!(store.company_industry_names("apple").await.unwrap().is_empty());
                assert!(!store.delete_industry("comp").await.unwrap());
            }

            #[tokio::test]
            async fn test_company_delete_cascades() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                store.insert_company(company("ibm", "IBM")).await.unwrap();
                store.insert_industry(industry("comp", "Computers")).await.unwrap();
                store.insert_assignment(assignment("apple", "comp")).await.unwrap();
                store.insert_assignment(assignment("ibm", "comp")).await.unwrap();

                assert!(store.delete_company("apple").await.unwrap());
                assert_eq!(
                    store.list_assignments().await.unwrap(),
                    vec![assignment("ibm", "comp")]
                );
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_invoice_inserts() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert_invoice(&new_invoice("apple", i as f64))
                            .await
                            .unwrap()
                            .id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10);
                assert_eq!(store.list_invoices().await.unwrap().len(), 10);
            }

            #[tokio::test]
            async fn test_concurrent_mark_paid() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();
                let id = store
                    .insert_invoice(&new_invoice("apple", 100.0))
                    .await
                    .unwrap()
                    .id;
                let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
                let stamps: Vec<_> = (0..8)
                    .map(|i| base + chrono::Duration::seconds(i))
                    .collect();

                let mut handles = Vec::new();
                for now in stamps.iter().copied() {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .update_invoice(id, 100.0, true, now)
                            .await
                            .unwrap()
                            .unwrap()
                    }));
                }

                let mut paid_dates = Vec::new();
                for handle in handles {
                    let invoice = handle.await.unwrap();
                    assert!(invoice.paid);
                    paid_dates.push(invoice.paid_date.unwrap());
                }

                let first = paid_dates[0];
                assert!(stamps.contains(&first));
                assert!(paid_dates.iter().all(|date| *date == first));

                let stored = store.get_invoice(id).await.unwrap().unwrap();
                assert_eq!(stored.paid_date, Some(first));
            }

            #[tokio::test]
            async fn test_concurrent_company_delete_and_update() {
                let store = $factory;
                store.insert_company(company("apple", "Apple")).await.unwrap();

                let mut deletes = Vec::new();
                let mut updates = Vec::new();
                for i in 0..5 {
                    let store_for_delete = store.clone();
                    deletes.push(tokio::spawn(async move {
                        store_for_delete.delete_company("apple").await.unwrap()
                    }));
                    let store_for_update = store.clone();
                    updates.push(tokio::spawn(async move {
                        store_for_update
                            .update_company(
                                "apple",
                                &company_changes(&format!("Apple {}", i), "Renamed"),
                            )
                            .await
                            .unwrap()
                    }));
                }

                let mut deleted = 0;
                for handle in deletes {
                    if handle.await.unwrap() {
                        deleted += 1;
                    }
                }
                assert_eq!(deleted, 1);

                for handle in updates {
                    if let Some(updated) = handle.await.unwrap() {
                        assert_eq!(updated.code, "apple");
                        assert_eq!(updated.description, "Renamed");
                    }
                }

                assert!(store.get_company("apple").await.unwrap().is_none());
            }
        }
    };
}
