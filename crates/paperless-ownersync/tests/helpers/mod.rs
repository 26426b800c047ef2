pub mod mock_paperless;
