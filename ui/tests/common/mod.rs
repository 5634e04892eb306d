use roster_ui::RosterApp;
use roster_ui::state::State;
use egui_kittest::Harness;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    _mock_server: MockServer,
    harness: Harness<'a, RosterApp>,
}

impl<'a> TestCtx<'a> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, RosterApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, RosterApp> {
        &self.harness
    }

    /// App backed by a mock server that serves [`sample_users`].
    pub async fn new_app() -> Self {
        Self::with_response(ResponseTemplate::new(200).set_body_json(sample_users())).await
    }

    #[allow(unused)]
    pub async fn new_app_with_status(status_code: u16) -> Self {
        Self::with_response(ResponseTemplate::new(status_code)).await
    }

    pub async fn with_response(response: ResponseTemplate) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri());
        let app = RosterApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            _mock_server: mock_server,
            harness,
        }
    }

    /// Step frames until the load leaves the loading state.
    pub async fn wait_for_load(&mut self) {
        for _ in 0..50 {
            self.harness.step();
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let loading = self
                .harness
                .state()
                .state
                .ctx
                .cached::<roster_business::users::LoadUsersCompute>()
                .is_none_or(|compute| {
                    matches!(
                        compute.status,
                        roster_business::users::LoadUsersStatus::Idle
                            | roster_business::users::LoadUsersStatus::Loading
                    )
                });
            if !loading {
                break;
            }
        }
        // Apply the result and render it.
        for _ in 0..3 {
            self.harness.step();
        }
    }

    /// Country column of the rendered rows, in order.
    #[allow(unused)]
    pub fn shown_countries(&self) -> Vec<String> {
        self.harness
            .state()
            .state
            .ctx
            .compute::<roster_business::users::DerivedUsersCompute>()
            .rows()
            .iter()
            .map(|user| user.country.clone())
            .collect()
    }
}

fn random_user(uuid: &str, first: &str, last: &str, country: &str) -> serde_json::Value {
    serde_json::json!({
        "gender": "male",
        "name": { "title": "Mr", "first": first, "last": last },
        "location": { "city": "Somewhere", "country": country },
        "login": { "uuid": uuid, "username": first },
        "picture": {
            "large": format!("https://randomuser.me/api/portraits/men/{uuid}.jpg"),
            "medium": "https://randomuser.me/api/portraits/med/men/1.jpg",
            "thumbnail": "https://randomuser.me/api/portraits/thumb/men/1.jpg"
        }
    })
}

pub fn sample_users() -> serde_json::Value {
    serde_json::json!({
        "results": [
            random_user("u-1", "Mateo", "Navarro", "Spain"),
            random_user("u-2", "Hugo", "Lefebvre", "France"),
            random_user("u-3", "Tomás", "Vidal", "Chile"),
        ],
        "info": { "seed": "kittest", "results": 3, "page": 1, "version": "1.4" }
    })
}
