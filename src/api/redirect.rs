use axum::response::Html;

// The implicit grant returns the token in the URL fragment, which browsers
// never send to the server. Move it into the query string of `/capture`.
const REDIRECT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>spotify-export</title>
  <script>
    window.onload = function () {
      const hash = window.location.hash.substring(1);
      const params = new URLSearchParams(hash);
      window.location.replace("/capture?" + params.toString());
    };
  </script>
</head>
<body>
  <p>Redirecting...</p>
</body>
</html>
"#;

pub async fn redirect() -> Html<&'static str> {
    Html(REDIRECT_PAGE)
}
