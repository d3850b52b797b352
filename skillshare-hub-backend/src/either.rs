/// Declares a pinned enum body with one variant per listed name, each
/// wrapping its own [`http_body::Body`] so a handler can return different
/// body types behind one response type.
#[macro_export]
macro_rules! either_http_body {
    ($vis:vis $name:ident $($variant:ident)+) => {
        ::paste::paste! {
            #[::pin_project::pin_project(project = [<$name Proj>])]
            #[derive(Debug)]
            $vis enum $name<$([<$variant Body>],)+> {
                $($variant(#[pin] [<$variant Body>]),)+
            }

            impl<
                $([<$variant Body>]: ::http_body::Body<Data = ::bytes::Bytes, Error = ::core::convert::Infallible>,)+
            > ::http_body::Body for $name<$([<$variant Body>],)+>
            {
                type Data = ::bytes::Bytes;
                type Error = ::core::convert::Infallible;

                fn poll_frame(
                    self: ::core::pin::Pin<&mut Self>,
                    cx: &mut ::core::task::Context<'_>,
                ) -> ::core::task::Poll<Option<Result<::http_body::Frame<Self::Data>, Self::Error>>> {
                    match self.project() {
                        $(
                            [<$name Proj>]::$variant(body) => body.poll_frame(cx),
                        )+
                    }
                }

                fn is_end_stream(&self) -> bool {
                    match self {
                        $(
                            Self::$variant(body) => body.is_end_stream(),
                        )+
                    }
                }

                fn size_hint(&self) -> ::http_body::SizeHint {
                    match self {
                        $(
                            Self::$variant(body) => body.size_hint(),
                        )+
                    }
                }
            }
        }
    };
}

either_http_body!(pub ResponseBody NoContent Json);

/// Body of every response the server writes.
pub type Body = ResponseBody<http_body_util::Empty<bytes::Bytes>, http_body_util::Full<bytes::Bytes>>;

impl Body {
    #[must_use]
    pub fn json(bytes: impl Into<bytes::Bytes>) -> Self {
        Self::Json(http_body_util::Full::new(bytes.into()))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::NoContent(http_body_util::Empty::new())
    }
}
