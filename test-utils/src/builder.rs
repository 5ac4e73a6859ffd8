use mockito::{Matcher, Server};

use crate::{
    context::TestContext,
    error::TestError,
    fixture::{
        account::{
            home_page, login_page, DEFAULT_AUTHENTICITY_TOKEN, DEFAULT_CSRF_TOKEN,
            DEFAULT_PASSWORD, DEFAULT_USERNAME,
        },
        shot::{self, ShotPage, DEFAULT_IMAGE_BYTES, DEFAULT_SHOT_PATH},
        solution,
    },
};

/// How the fake site answers the login form submission.
enum LoginMode {
    /// No login routes are mounted.
    None,
    /// Only the given credentials are accepted.
    Accept { username: String, password: String },
    /// Every submission gets the login form back.
    Reject,
}

/// Builder for creating fake quiz sites with customizable routes.
///
/// Provides a fluent interface for choosing which parts of the site exist and what they
/// return, then `build()` starts a `mockito` server with those routes mounted.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, fixture};
///
/// let test = TestBuilder::new()
///     .with_default_account()
///     .with_random_options()
///     .with_shot(fixture::shot::page())
///     .with_solution("Inception", 2010)
///     .with_image(fixture::shot::DEFAULT_IMAGE_BYTES)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    login: LoginMode,
    random_options: bool,
    shot: Option<ShotPage>,
    solution: Option<String>,
    image: Option<Vec<u8>>,
}

impl TestBuilder {
    /// Creates a new builder with no routes configured.
    pub fn new() -> Self {
        Self {
            login: LoginMode::None,
            random_options: false,
            shot: None,
            solution: None,
            image: None,
        }
    }

    /// Accepts logins with the given credentials.
    ///
    /// Mounts `GET /user/login` (the form), `POST /user/login` (redirecting to `/` when the
    /// submitted form matches) and `GET /` (the logged-in landing page).
    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.login = LoginMode::Accept {
            username: username.to_string(),
            password: password.to_string(),
        };
        self
    }

    /// Accepts logins with `fixture::account::DEFAULT_USERNAME` / `DEFAULT_PASSWORD`.
    pub fn with_default_account(self) -> Self {
        self.with_account(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }

    /// Answers every login submission with the login form, as the site does for bad
    /// credentials.
    pub fn with_rejected_login(mut self) -> Self {
        self.login = LoginMode::Reject;
        self
    }

    /// Mounts `POST /shot/setrandomoptions`.
    pub fn with_random_options(mut self) -> Self {
        self.random_options = true;
        self
    }

    /// Serves the given page from `/shot/random` (through a redirect).
    pub fn with_shot(mut self, page: ShotPage) -> Self {
        self.shot = Some(page);
        self
    }

    /// Serves a solution script revealing `title` and `year` at the shot's solution link.
    pub fn with_solution(self, title: &str, year: i32) -> Self {
        self.with_solution_script(solution::script(title, year))
    }

    /// Serves an arbitrary solution script at the shot's solution link.
    pub fn with_solution_script(mut self, script: String) -> Self {
        self.solution = Some(script);
        self
    }

    /// Serves the given bytes at the shot's image path.
    pub fn with_image(mut self, bytes: &[u8]) -> Self {
        self.image = Some(bytes.to_vec());
        self
    }

    /// Mounts a complete, working site: default account, random options, the default shot
    /// revealing "Inception" (2010), and its image.
    pub fn with_site(self) -> Self {
        self.with_default_account()
            .with_random_options()
            .with_shot(shot::page())
            .with_solution("Inception", 2010)
            .with_image(DEFAULT_IMAGE_BYTES)
    }

    /// Starts the fake site with the configured routes.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Running server with every route mounted
    /// - `Err(TestError::InvalidFixture)` - A solution script was configured for a shot
    ///   without a solution link, or without any shot at all
    pub async fn build(self) -> Result<TestContext, TestError> {
        let server = Server::new_async().await;
        let mut test = TestContext::new(server);

        match self.login {
            LoginMode::None => {}
            LoginMode::Accept { username, password } => {
                let form = test
                    .server
                    .mock("GET", "/user/login")
                    .with_status(200)
                    .with_body(login_page(DEFAULT_AUTHENTICITY_TOKEN))
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("login_form", form);

                let login = test
                    .server
                    .mock("POST", "/user/login")
                    .match_body(Matcher::AllOf(vec![
                        Matcher::UrlEncoded("name".into(), username),
                        Matcher::UrlEncoded("upassword".into(), password),
                        Matcher::UrlEncoded(
                            "authenticity_token".into(),
                            DEFAULT_AUTHENTICITY_TOKEN.into(),
                        ),
                    ]))
                    .with_status(302)
                    .with_header("location", "/")
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("login", login);

                let home = test
                    .server
                    .mock("GET", "/")
                    .with_status(200)
                    .with_body(home_page(DEFAULT_CSRF_TOKEN))
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("home", home);
            }
            LoginMode::Reject => {
                let form = test
                    .server
                    .mock("GET", "/user/login")
                    .with_status(200)
                    .with_body(login_page(DEFAULT_AUTHENTICITY_TOKEN))
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("login_form", form);

                let login = test
                    .server
                    .mock("POST", "/user/login")
                    .with_status(200)
                    .with_body(login_page(DEFAULT_AUTHENTICITY_TOKEN))
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("login", login);
            }
        }

        if self.random_options {
            let options = test
                .server
                .mock("POST", "/shot/setrandomoptions")
                .match_header("x-csrf-token", DEFAULT_CSRF_TOKEN)
                .with_status(200)
                .expect_at_least(1)
                .create_async()
                .await;
            test.insert("random_options", options);
        }

        let solution_href = self.shot.as_ref().and_then(|s| s.solution_href.clone());
        if self.solution.is_some() && solution_href.is_none() {
            return Err(TestError::InvalidFixture(
                "solution script configured but the shot has no solution link".to_string(),
            ));
        }

        if let Some(page) = self.shot {
            let random = test
                .server
                .mock("GET", "/shot/random")
                .with_status(302)
                .with_header("location", DEFAULT_SHOT_PATH)
                .expect_at_least(1)
                .create_async()
                .await;
            test.insert("random", random);

            let shot = test
                .server
                .mock("GET", DEFAULT_SHOT_PATH)
                .with_status(200)
                .with_body(page.html())
                .expect_at_least(1)
                .create_async()
                .await;
            test.insert("shot", shot);

            if let Some(bytes) = self.image {
                let image = test
                    .server
                    .mock("GET", page.image_src.as_str())
                    .with_status(200)
                    .with_header("content-type", "image/jpeg")
                    .with_body(bytes)
                    .expect_at_least(1)
                    .create_async()
                    .await;
                test.insert("image", image);
            }
        }

        if let (Some(script), Some(href)) = (self.solution, solution_href) {
            let solution = test
                .server
                .mock("GET", href.as_str())
                .match_header("x-requested-with", "XMLHttpRequest")
                .match_header("x-csrf-token", DEFAULT_CSRF_TOKEN)
                .with_status(200)
                .with_header("content-type", "text/javascript")
                .with_body(script)
                .expect_at_least(1)
                .create_async()
                .await;
            test.insert("solution", solution);
        }

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
