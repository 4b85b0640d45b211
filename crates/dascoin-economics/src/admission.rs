// crates/dascoin-economics/src/admission.rs
//
// Submission admission: validates and appends reward queue entries.
//
// Three origins feed the queue:
//   - user_submit:     an account spends cycles from its own free balance at
//                      the current chain frequency.
//   - reserve_cycles:  the cycle issuing authority grants cycles straight into
//                      the queue at an issuer-supplied frequency.
//   - charter_license: issuing a license queues
//                      `amount + amount * bonus / 100` cycles at the license's
//                      frequency lock.
//
// All three funnel into `prepare_submission`, which validates the request and
// computes the entry's historic sum without touching any state. Nothing is
// mutated until every check has passed, so a rejected submission leaves the
// queue and the ledger exactly as they were.

use serde::{Deserialize, Serialize};

use dascoin_core::authority::ChainAuthorities;
use dascoin_core::error::DascoinError;
use dascoin_core::license::LicenseKind;
use dascoin_core::params::ChainParameters;
use dascoin_core::traits::{BalanceLedger, LicenseCatalog};
use dascoin_core::types::{AccountId, Frequency, ShareType, Timestamp};

use crate::conversion::cycles_to_dascoin;
use crate::queue::{NewQueueEntry, QueueOrigin, RewardQueue};

/// A validated-on-append queue submission, common to all origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub origin: QueueOrigin,
    pub account: AccountId,
    pub amount: ShareType,
    pub frequency: Frequency,
    pub comment: String,
}

/// Cycles granted into the queue by the cycle issuing authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveCyclesRequest {
    pub issuer: AccountId,
    pub account: AccountId,
    pub amount: ShareType,
    pub frequency_lock: Frequency,
    #[serde(default)]
    pub comment: String,
}

/// A license issued to an account by the license issuing authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseIssuance {
    pub issuer: AccountId,
    pub account: AccountId,
    /// Catalogue name of the license template.
    pub license: String,
    /// Overrides the template's bonus percentage.
    #[serde(default)]
    pub bonus_percentage: Option<ShareType>,
    /// Overrides the template's frequency lock.
    #[serde(default)]
    pub frequency_lock: Option<Frequency>,
}

/// Validate a submission and build the entry it would append.
///
/// The dascoin value is computed at the submission's own frequency and added
/// to the queue's historic total (or `total_minted` when the queue is empty).
///
/// # Errors
/// `InvalidAmount` for a non-positive amount, `InvalidFrequency` for a
/// non-positive frequency, `ArithmeticOverflow` if the historic sum overflows.
pub fn prepare_submission(
    queue: &RewardQueue,
    submission: Submission,
    total_minted: ShareType,
    now: Timestamp,
) -> Result<NewQueueEntry, DascoinError> {
    if submission.amount <= 0 {
        return Err(DascoinError::InvalidAmount(format!(
            "queue submission amount must be positive, got {}",
            submission.amount
        )));
    }
    if submission.frequency <= 0 {
        return Err(DascoinError::InvalidFrequency(format!(
            "queue submission frequency must be positive, got {}",
            submission.frequency
        )));
    }

    let dascoin_amount = cycles_to_dascoin(submission.amount, submission.frequency)?;
    let historic_sum = queue
        .historic_total(total_minted)
        .checked_add(dascoin_amount)
        .ok_or(DascoinError::ArithmeticOverflow("historic sum"))?;

    Ok(NewQueueEntry {
        origin: submission.origin,
        account: submission.account,
        amount: submission.amount,
        frequency_lock: submission.frequency,
        created_at: now,
        comment: submission.comment,
        historic_sum,
    })
}

fn append_prepared(queue: &mut RewardQueue, entry: NewQueueEntry) -> usize {
    let origin = entry.origin.as_str();
    let account = entry.account;
    let amount = entry.amount;
    let frequency = entry.frequency_lock;
    let position = queue.append(entry);
    tracing::debug!(
        origin,
        %account,
        amount,
        frequency,
        position,
        "queue submission accepted"
    );
    position
}

/// Common append path: validate, compute the historic sum, append.
///
/// Returns the 0-based queue position of the new entry.
pub fn push_queue_submission(
    queue: &mut RewardQueue,
    submission: Submission,
    total_minted: ShareType,
    now: Timestamp,
) -> Result<usize, DascoinError> {
    let entry = prepare_submission(queue, submission, total_minted, now)?;
    Ok(append_prepared(queue, entry))
}

/// `user_submit`: spend `amount` free cycles of `account` into the queue at
/// the current chain frequency.
///
/// # Errors
/// Validation errors from `prepare_submission`, or `InsufficientBalance` if
/// the account holds fewer than `amount` free cycles.
pub fn submit_cycles<L: BalanceLedger>(
    queue: &mut RewardQueue,
    ledger: &mut L,
    params: &ChainParameters,
    account: AccountId,
    amount: ShareType,
    now: Timestamp,
) -> Result<usize, DascoinError> {
    let submission = Submission {
        origin: QueueOrigin::UserSubmit,
        account,
        amount,
        frequency: params.frequency,
        comment: String::new(),
    };
    let entry = prepare_submission(queue, submission, ledger.total_dascoin_minted(), now)?;
    ledger.debit_cycle_balance(account, amount)?;
    Ok(append_prepared(queue, entry))
}

/// `reserve_cycles`: the cycle issuer grants cycles into the queue on behalf
/// of an account. The account's free balance is not touched.
pub fn submit_reserve_cycles<L: BalanceLedger>(
    queue: &mut RewardQueue,
    ledger: &L,
    authorities: &ChainAuthorities,
    request: ReserveCyclesRequest,
    now: Timestamp,
) -> Result<usize, DascoinError> {
    authorities.require_cycle_issuer(request.issuer)?;
    let submission = Submission {
        origin: QueueOrigin::ReserveCycles,
        account: request.account,
        amount: request.amount,
        frequency: request.frequency_lock,
        comment: request.comment,
    };
    push_queue_submission(queue, submission, ledger.total_dascoin_minted(), now)
}

/// `charter_license`: issue a license and queue its bonus-scaled cycles at the
/// license's frequency lock.
///
/// # Errors
/// `UnauthorizedOrigin` if the issuer is not the license issuing authority,
/// `UnknownLicense` if the template does not exist, `InvalidParameter` if it
/// is a regular rather than a chartered license, plus validation errors.
pub fn issue_chartered_license<L: BalanceLedger, C: LicenseCatalog>(
    queue: &mut RewardQueue,
    ledger: &L,
    catalog: &C,
    authorities: &ChainAuthorities,
    request: LicenseIssuance,
    now: Timestamp,
) -> Result<usize, DascoinError> {
    authorities.require_license_issuer(request.issuer)?;
    let license = catalog
        .lookup(&request.license)
        .ok_or_else(|| DascoinError::UnknownLicense(request.license.clone()))?;
    if license.kind != LicenseKind::Chartered {
        return Err(DascoinError::InvalidParameter(format!(
            "license {} is not a chartered license",
            license.name
        )));
    }

    let bonus = request.bonus_percentage.unwrap_or(license.bonus_percentage);
    let frequency = request.frequency_lock.unwrap_or(license.frequency_lock);
    let amount = license.queue_amount(bonus)?;

    let submission = Submission {
        origin: QueueOrigin::CharterLicense { license: license.id },
        account: request.account,
        amount,
        frequency,
        comment: format!("Licence {}", license.name),
    };
    push_queue_submission(queue, submission, ledger.total_dascoin_minted(), now)
}
