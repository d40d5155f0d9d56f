pub mod shared {
    pub mod infrastructure {
        pub mod event_store;
        pub mod query_cache;
    }
}

pub mod modules {
    pub mod taste_tests {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod filter;
            pub mod geography;
            pub mod projections;
            pub mod record;
            pub mod sort;
            pub mod state;
            pub mod summary;
            pub mod taxonomy;
        }
        pub mod use_cases {
            pub mod record_taste_test {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod projector;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod browse_results {
                pub mod handler;
                pub mod queries_port;
                pub mod query;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
                pub mod projections_in_memory;
                pub mod rest_backend;
                pub mod row_mapping;
            }
        }
    }
}

pub mod shell;
