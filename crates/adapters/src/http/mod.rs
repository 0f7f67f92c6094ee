pub mod paginated_client;
