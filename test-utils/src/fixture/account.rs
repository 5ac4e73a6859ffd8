//! Login and landing page fixtures.

/// Default username accepted by the fake site.
pub const DEFAULT_USERNAME: &str = "quizmaster";

/// Default password accepted by the fake site.
pub const DEFAULT_PASSWORD: &str = "popcorn";

/// Hidden form token embedded in the login page.
pub const DEFAULT_AUTHENTICITY_TOKEN: &str = "auth-token-123";

/// CSRF token exposed through the `csrf-token` meta tag once logged in.
pub const DEFAULT_CSRF_TOKEN: &str = "csrf-token-456";

/// Creates the login page containing the sign-in form.
///
/// The form carries the hidden `authenticity_token` input the fetcher must echo back,
/// alongside the `name` and `upassword` fields.
///
/// # Arguments
/// - `authenticity_token` - Value of the hidden form token
///
/// # Returns
/// - `String` - Full HTML document
pub fn login_page(authenticity_token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Login - WhatTheMovie</title>
</head>
<body>
  <form action="/user/login" method="post" id="login_form">
    <input name="utf8" type="hidden" value="&#x2713;" />
    <input type="hidden" name="authenticity_token" value="{authenticity_token}" />
    <input type="text" name="name" id="name" />
    <input type="password" name="upassword" id="upassword" />
    <input type="submit" value="Login" />
  </form>
</body>
</html>"#
    )
}

/// Creates the page served after a successful login.
///
/// # Arguments
/// - `csrf_token` - Value of the `csrf-token` meta tag
///
/// # Returns
/// - `String` - Full HTML document
pub fn home_page(csrf_token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>WhatTheMovie</title>
  <meta content="authenticity_token" name="csrf-param" />
  <meta content="{csrf_token}" name="csrf-token" />
</head>
<body>
  <div id="user_box">Welcome back! <a href="/user/logout">Logout</a></div>
</body>
</html>"#
    )
}
