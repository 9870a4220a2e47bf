//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use coupons_app::{
    auth::{AuthenticatedSession, MockAuthService},
    context::AppContext,
    health::MockHealthService,
    domain::{
        cashback::MockCashbackService,
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        coupons::{
            MockCouponsService,
            data::{Discount, DiscountKind},
            records::{CouponRecord, CouponStore, CouponUuid},
        },
        notifications::MockNotificationsService,
        stores::{
            MockStoresService,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            MockUsersService,
            records::{UserPreferences, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_SESSION: AuthenticatedSession = AuthenticatedSession {
    session_uuid: Uuid::nil(),
    user_uuid: TEST_USER_UUID,
};

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(TEST_SESSION);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks with no expectations; any call a test did not set up fails.
#[derive(Default)]
pub(crate) struct Mocks {
    pub coupons: MockCouponsService,
    pub stores: MockStoresService,
    pub categories: MockCategoriesService,
    pub users: MockUsersService,
    pub notifications: MockNotificationsService,
    pub cashback: MockCashbackService,
    pub auth: MockAuthService,
    pub health: MockHealthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            coupons: Arc::new(self.coupons),
            stores: Arc::new(self.stores),
            categories: Arc::new(self.categories),
            users: Arc::new(self.users),
            notifications: Arc::new(self.notifications),
            cashback: Arc::new(self.cashback),
            auth: Arc::new(self.auth),
            health: Arc::new(self.health),
        })
    }
}

/// Serve `route` with the given mocks and [`TEST_SESSION`] as the caller.
pub(crate) fn authenticated_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_session)
            .push(route),
    )
}

/// Serve `route` with the given mocks and no caller.
pub(crate) fn anonymous_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_string(),
        slug: name.to_lowercase(),
        icon: "tag".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_store(uuid: StoreUuid) -> StoreRecord {
    StoreRecord {
        uuid,
        name: "Acme".to_string(),
        logo: "https://acme.example.com/logo.png".to_string(),
        website: "https://acme.example.com".to_string(),
        coupon_count: 1,
        is_popular: false,
        categories: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_coupon(uuid: CouponUuid) -> CouponRecord {
    CouponRecord {
        uuid,
        title: "20% off everything".to_string(),
        description: "Sitewide discount".to_string(),
        code: "SAVE20".to_string(),
        discount: Discount {
            kind: DiscountKind::Percentage,
            value: 20.0,
        },
        store: CouponStore {
            uuid: StoreUuid::from_uuid(Uuid::nil()),
            name: "Acme".to_string(),
            logo: "https://acme.example.com/logo.png".to_string(),
            website: "https://acme.example.com".to_string(),
        },
        categories: Vec::new(),
        expiry_date: Timestamp::UNIX_EPOCH,
        terms: None,
        url: None,
        is_verified: false,
        success_rate: 0.0,
        used_count: 0,
        is_popular: false,
        is_new: true,
        is_expiring_soon: false,
        cashback: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: "shopper@example.com".to_string(),
        name: "Shopper".to_string(),
        avatar: None,
        preferences: UserPreferences::default(),
        points_balance: 0,
        referral_code: "SHO12AB3".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
